//! End-to-end behaviour of GUIs built on the headless engine.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tapestry_engine::{Engine, LoopError, Object, Property};
use tapestry_ui::prelude::*;

fn gui(markup: &str) -> Gui<Engine> {
    Gui::builder(Engine::new()).name("test").markup(markup).build().unwrap()
}

fn build_err(markup: &str) -> GuiError {
    Gui::builder(Engine::new()).name("test").markup(markup).build().unwrap_err()
}

/// First child of the root window.
fn content(gui: &Gui<Engine>) -> Object {
    gui.root().unwrap().children()[0].clone()
}

fn counter() -> (Rc<Cell<u32>>, impl Fn(&Gui<Engine>) + 'static) {
    let hits = Rc::new(Cell::new(0));
    let seen = hits.clone();
    (hits, move |_: &Gui<Engine>| seen.set(seen.get() + 1))
}

// ── Construction ──────────────────────────────────────────────────────────

#[test]
fn entry_scenario() {
    let gui = gui("<Window><Entry changed='c' value='v:start'/></Window>");
    assert_eq!(gui.names(), ["c", "v"]);
    assert_eq!(
        gui.variables(),
        [
            ("c".to_string(), vec![VariableKind::Event]),
            ("v".to_string(), vec![VariableKind::Get, VariableKind::Set]),
        ]
    );
    assert_eq!(gui.get("v").unwrap(), "start");

    let (hits, callback) = counter();
    gui.on("c", callback).unwrap();
    content(&gui).set_property("text", Property::from("hello")).unwrap();
    assert_eq!(gui.get("v").unwrap(), "hello");
    assert_eq!(hits.get(), 1);
}

#[test]
fn unknown_tag() {
    assert!(matches!(build_err("<Frobnicator/>"), GuiError::UnknownWidget { tag } if tag == "Frobnicator"));
}

#[test]
fn nested_unknown_tag_aborts_build() {
    let err = build_err("<Window><VBox><Label/><Gizmo/></VBox></Window>");
    assert!(matches!(err, GuiError::UnknownWidget { tag } if tag == "Gizmo"));
}

#[test]
fn parse_errors_surface() {
    assert!(matches!(build_err("<Window>"), GuiError::Parse(_)));
}

#[test]
fn namespace_holds_exactly_declared_names() {
    let gui = gui(
        "<Window title='t'>
            <VBox>
                <Label value='status'/>
                <Label>static</Label>
                <Button clicked='go'>Go</Button>
                <CheckButton value='agree' toggled='agree_changed'/>
            </VBox>
        </Window>",
    );
    assert_eq!(gui.names(), ["agree", "agree_changed", "go", "status", "t"]);
}

#[test]
fn missing_variable() {
    let gui = gui("<Window/>");
    assert!(matches!(gui.get("missing"), Err(GuiError::UnknownVariable { name }) if name == "missing"));
    assert!(matches!(gui.set("missing", "x"), Err(GuiError::UnknownVariable { .. })));
}

#[test]
fn window_title_defaults_to_app_name() {
    let gui = gui("<Window/>");
    assert_eq!(gui.root().unwrap().text("title").as_deref(), Some("test"));

    let gui = self::gui("<Window title=':Custom'/>");
    assert_eq!(gui.root().unwrap().text("title").as_deref(), Some("Custom"));
    assert!(gui.names().is_empty());
}

#[test]
fn wrong_access_is_unsupported() {
    let gui = gui("<Window title='t'><Button clicked='go'/></Window>");
    assert!(matches!(gui.get("t"), Err(GuiError::UnsupportedAccess { access: Access::Read, .. })));
    assert!(matches!(gui.set("go", 1), Err(GuiError::UnsupportedAccess { access: Access::Write, .. })));
    assert!(matches!(gui.on("t", |_| {}), Err(GuiError::UnsupportedAccess { access: Access::Subscribe, .. })));
    gui.set("t", "fine").unwrap();
}

#[test]
fn duplicate_binding() {
    let err = build_err("<Window><VBox><Entry value='x'/><Entry value='x'/></VBox></Window>");
    assert!(matches!(err, GuiError::DuplicateBinding { name } if name == "x"));

    let err = build_err("<Window><VBox><Entry value='x'/><Button clicked='x'/></VBox></Window>");
    assert!(matches!(err, GuiError::DuplicateBinding { .. }));
}

#[test]
fn unused_attribute() {
    let err = build_err("<Window><Label colour='red'/></Window>");
    assert!(matches!(err, GuiError::UnusedAttributes { tag, attributes } if tag == "Label" && attributes == ["colour"]));
}

#[test]
fn unused_text() {
    assert!(matches!(build_err("<Window><Entry>oops</Entry></Window>"), GuiError::UnusedAttributes { .. }));
}

#[test]
fn leaf_with_children_is_malformed() {
    assert!(matches!(build_err("<Window><Label><Label/></Label></Window>"), GuiError::MalformedTree(_)));
    assert!(matches!(build_err("<Window><Label/><Label/></Window>"), GuiError::MalformedTree(_)));
}

#[test]
fn bad_initial_literal() {
    let err = build_err("<Window><CheckButton value='ok:maybe'/></Window>");
    assert!(matches!(err, GuiError::InvalidAttribute { tag, attribute, .. } if tag == "CheckButton" && attribute == "value"));
}

// ── Values ────────────────────────────────────────────────────────────────

#[test]
fn spin_round_trip() {
    let gui = gui("<Window><SpinButton range=':0,10' value='n:3'/></Window>");
    assert_eq!(gui.get("n").unwrap(), Value::Number(3.0));
    for v in [0.0, 2.5, 10.0] {
        gui.set("n", v).unwrap();
        assert_eq!(gui.get("n").unwrap(), Value::Number(v));
    }
    gui.set("n", "7").unwrap();
    assert_eq!(gui.get("n").unwrap(), Value::Number(7.0));
}

#[test]
fn spin_out_of_range_leaves_state() {
    let gui = gui("<Window><SpinButton range=':0,10' value='n:3'/></Window>");
    assert!(matches!(gui.set("n", 11.0), Err(GuiError::InvalidValue { name, .. }) if name == "n"));
    assert!(matches!(gui.set("n", "many"), Err(GuiError::InvalidValue { .. })));
    assert_eq!(gui.get("n").unwrap(), Value::Number(3.0));
}

#[test]
fn spin_range_is_settable() {
    let gui = gui("<Window><SpinButton range='r:0,100' value='n:50'/></Window>");
    gui.set("r", "0,20").unwrap();
    assert_eq!(gui.get("n").unwrap(), Value::Number(20.0));
    assert!(gui.set("r", "5").is_err());
}

#[test]
fn spin_rejects_nan_range() {
    let gui = gui("<Window><SpinButton range='r:0,10' value='n:3'/></Window>");
    assert!(matches!(gui.set("r", "NaN,5"), Err(GuiError::InvalidValue { name, .. }) if name == "r"));
    assert_eq!(gui.get("n").unwrap(), Value::Number(3.0));
    let err = build_err("<Window><SpinButton range=':nan,nan'/></Window>");
    assert!(matches!(err, GuiError::InvalidAttribute { attribute, .. } if attribute == "range"));
}

#[test]
fn combo_selects_and_appends() {
    let gui = gui(
        "<Window><ComboBoxText value='colour' content='options' changed='picked'>
            red
            green
        </ComboBoxText></Window>",
    );
    let (hits, callback) = counter();
    gui.on("picked", callback).unwrap();
    assert_eq!(gui.get("colour").unwrap(), "red");
    gui.set("colour", "green").unwrap();
    gui.set("colour", "blue").unwrap();
    assert_eq!(gui.get("colour").unwrap(), "blue");
    assert_eq!(hits.get(), 2);

    gui.set("options", vec!["x", "y"]).unwrap();
    assert_eq!(gui.get("colour").unwrap(), "");
}

#[test]
fn combo_entry_accepts_typed_text() {
    let gui = gui(
        "<Window><ComboBoxEntryText value='drink' changed='edited' activate='order'>
            tea
            coffee
        </ComboBoxEntryText></Window>",
    );
    let (orders, on_order) = counter();
    gui.on("order", on_order).unwrap();
    let (edits, on_edit) = counter();
    gui.on("edited", on_edit).unwrap();
    assert_eq!(gui.get("drink").unwrap(), "tea");

    let combo = content(&gui);
    combo.set_property("text", Property::from("cocoa")).unwrap();
    assert_eq!(gui.get("drink").unwrap(), "cocoa");
    assert_eq!(combo.number("active"), Some(-1.0));
    combo.emit("activate").unwrap();
    assert_eq!(orders.get(), 1);

    gui.set("drink", "coffee").unwrap();
    assert_eq!(gui.get("drink").unwrap(), "coffee");
    assert_eq!(edits.get(), 2);
}

#[test]
fn plain_combo_has_no_activate() {
    let err = build_err("<Window><ComboBoxText activate='go'/></Window>");
    assert!(matches!(err, GuiError::UnusedAttributes { attributes, .. } if attributes == ["activate"]));
}

#[test]
fn file_chooser() {
    let gui = gui("<Window><FileChooserButton title='dialog:Open log' value='path' chosen='picked'/></Window>");
    let (hits, callback) = counter();
    gui.on("picked", callback).unwrap();
    let chooser = content(&gui);
    assert_eq!(chooser.text("title").as_deref(), Some("Open log"));
    assert_eq!(gui.get("path").unwrap(), "");

    chooser.set_property("filename", Property::from("/var/log/app.log")).unwrap();
    assert_eq!(gui.get("path").unwrap(), "/var/log/app.log");
    assert_eq!(hits.get(), 1);
    gui.set("dialog", "Save log").unwrap();
    assert_eq!(chooser.text("title").as_deref(), Some("Save log"));
    assert!(matches!(gui.set("path", "/tmp/x"), Err(GuiError::UnsupportedAccess { .. })));
}

#[test]
fn check_button_toggles() {
    let gui = gui("<Window><CheckButton value='on:True' toggled='flip'>Enable</CheckButton></Window>");
    let (hits, callback) = counter();
    gui.on("flip", callback).unwrap();
    assert_eq!(gui.get("on").unwrap(), Value::Bool(true));
    assert_eq!(content(&gui).text("label").as_deref(), Some("Enable"));
    gui.set("on", "False").unwrap();
    gui.set("on", false).unwrap();
    assert_eq!(hits.get(), 1);
}

#[test]
fn notebook_pages() {
    let gui = gui(
        "<Window><Notebook page='page' switched='switched'>
            <Label tab_label=':One'>first</Label>
            <Label tab_label='second_tab:Two' current_page='front:True'>second</Label>
        </Notebook></Window>",
    );
    assert_eq!(gui.get("page").unwrap(), Value::Number(1.0));
    let pages = content(&gui).children();
    assert_eq!(pages[0].child_property("tab-label"), Some(Property::from("One")));

    let (hits, callback) = counter();
    gui.on("switched", callback).unwrap();
    gui.set("page", 0).unwrap();
    assert_eq!(hits.get(), 1);
    assert!(gui.set("page", 2).is_err());

    gui.set("front", true).unwrap();
    assert_eq!(gui.get("page").unwrap(), Value::Number(1.0));
    gui.set("second_tab", "Deux").unwrap();
    assert_eq!(pages[1].child_property("tab-label"), Some(Property::from("Deux")));
    assert!(matches!(gui.get("front"), Err(GuiError::UnsupportedAccess { .. })));
}

#[test]
fn box_packing() {
    let gui = gui(
        "<Window><HBox spacing='4'>
            <Label expand=':False'/>
            <Label/>
        </HBox></Window>",
    );
    let children = content(&gui).children();
    assert_eq!(children[0].child_property("expand"), Some(Property::Flag(false)));
    assert_eq!(children[1].child_property("fill"), Some(Property::Flag(true)));
    assert_eq!(content(&gui).text("orientation").as_deref(), Some("horizontal"));
    assert!(gui.names().is_empty());
}

#[test]
fn packing_is_settable() {
    let gui = gui("<Window><VBox><Label value='status' expand='e:False' fill='f'/></VBox></Window>");
    assert_eq!(gui.names(), ["e", "f", "status"]);
    assert_eq!(gui.variables()[0], ("e".to_string(), vec![VariableKind::Set]));
    let label = content(&gui).children()[0].clone();
    assert_eq!(label.child_property("expand"), Some(Property::Flag(false)));
    assert_eq!(label.child_property("fill"), Some(Property::Flag(true)));

    gui.set("e", true).unwrap();
    gui.set("f", "False").unwrap();
    assert_eq!(label.child_property("expand"), Some(Property::Flag(true)));
    assert_eq!(label.child_property("fill"), Some(Property::Flag(false)));
    assert!(matches!(gui.set("e", "sometimes"), Err(GuiError::InvalidValue { .. })));
}

#[test]
fn packing_name_follows_child_ownership() {
    let err = build_err("<Window><VBox><Label value='x' expand='x'/></VBox></Window>");
    assert!(matches!(err, GuiError::DuplicateBinding { name } if name == "x"));
    let err = build_err("<Window><VBox><Label expand='x'/><Label fill='x'/></VBox></Window>");
    assert!(matches!(err, GuiError::DuplicateBinding { name } if name == "x"));
}

#[test]
fn bad_packing_literal() {
    let err = build_err("<Window><VBox><Label expand=':maybe'/></VBox></Window>");
    assert!(matches!(err, GuiError::InvalidAttribute { tag, attribute, .. } if tag == "Label" && attribute == "expand"));
}

fn cell(obj: &Object) -> [Option<Property>; 4] {
    ["left-attach", "right-attach", "top-attach", "bottom-attach"].map(|key| obj.child_property(key))
}

fn at(left: f64, right: f64, top: f64, bottom: f64) -> [Option<Property>; 4] {
    [left, right, top, bottom].map(|v| Some(Property::Number(v)))
}

#[test]
fn table_places_children_in_reading_order() {
    let gui = gui(
        "<Window><Table columns='2'>
            <Label>a</Label>
            <Label>b</Label>
            <Label right=':2'>wide</Label>
            <Label top=':5' y-options=':shrink'>low</Label>
            <Label>next</Label>
        </Table></Window>",
    );
    let cells = content(&gui).children();
    assert_eq!(cell(&cells[0]), at(0.0, 1.0, 0.0, 1.0));
    assert_eq!(cell(&cells[1]), at(1.0, 2.0, 0.0, 1.0));
    assert_eq!(cell(&cells[2]), at(0.0, 2.0, 1.0, 2.0));
    assert_eq!(cell(&cells[3]), at(0.0, 1.0, 5.0, 6.0));
    assert_eq!(cell(&cells[4]), at(1.0, 2.0, 5.0, 6.0));
    assert_eq!(cells[0].child_property("x-options"), Some(Property::from("expand,fill")));
    assert_eq!(cells[3].child_property("y-options"), Some(Property::from("shrink")));
    assert_eq!(content(&gui).number("columns"), Some(2.0));
}

#[test]
fn table_placement_is_settable() {
    let gui = gui(
        "<Window><Table columns='3'>
            <Label left='col:1' right='end' x-options='xo'/>
        </Table></Window>",
    );
    assert_eq!(gui.names(), ["col", "end", "xo"]);
    let label = content(&gui).children()[0].clone();
    assert_eq!(cell(&label), at(1.0, 2.0, 0.0, 1.0));

    gui.set("end", 3).unwrap();
    gui.set("col", 2).unwrap();
    gui.set("xo", "fill").unwrap();
    assert_eq!(cell(&label), at(2.0, 3.0, 0.0, 1.0));
    assert_eq!(label.child_property("x-options"), Some(Property::from("fill")));
    assert!(matches!(gui.set("col", 3), Err(GuiError::InvalidValue { .. })));
    assert!(matches!(gui.set("xo", "stretch"), Err(GuiError::InvalidValue { .. })));
}

#[test]
fn table_rejects_bad_cells() {
    let err = build_err("<Window><Table><Label left=':2' right=':1'/></Table></Window>");
    assert!(matches!(err, GuiError::InvalidAttribute { attribute, .. } if attribute == "right"));
    let err = build_err("<Window><Table><Label top=':-1'/></Table></Window>");
    assert!(matches!(err, GuiError::InvalidAttribute { tag, attribute, .. } if tag == "Label" && attribute == "top"));
    let err = build_err("<Window><Table columns='0'/></Window>");
    assert!(matches!(err, GuiError::InvalidAttribute { attribute, .. } if attribute == "columns"));
}

#[test]
fn packing_outside_container_is_unused() {
    assert!(matches!(build_err("<Window><Label expand=':True'/></Window>"), GuiError::UnusedAttributes { .. }));
}

#[test]
fn negative_spacing_is_invalid() {
    assert!(matches!(build_err("<Window><VBox spacing='-1'/></Window>"), GuiError::InvalidAttribute { .. }));
    assert!(matches!(build_err("<Window><VBox spacing='NaN'/></Window>"), GuiError::InvalidAttribute { .. }));
}

// ── Data cells and custom widgets ─────────────────────────────────────────

/// A label that counts clicks into a data cell.
struct Tally;

impl WidgetConstructor<Engine> for Tally {
    fn bindings(&self) -> &'static [&'static str] {
        &["store", "count"]
    }

    fn construct(&self, cx: &mut BuildCx<'_, Engine>) -> Result<Constructed<Engine>, GuiError> {
        let label = cx.toolkit.create("Label").map_err(GuiError::toolkit)?;
        let store = cx.data().clone();
        let cell = cx.bound_name("store").unwrap_or("tally").to_string();
        Ok(Constructed::new(label)
            .data("store", Some(Value::from(0)))
            .get("count", move || store.get(&cell).unwrap_or_default()))
    }
}

#[test]
fn data_cells() {
    let gui = Gui::builder(Engine::new())
        .name("test")
        .widget("Tally", Tally)
        .data("greeting", "hi")
        .markup("<Window><VBox><Tally store='clicks' count='count'/><Tally store='clicks'/></VBox></Window>")
        .build()
        .unwrap();

    assert_eq!(gui.get("clicks").unwrap(), Value::Number(0.0));
    gui.set("clicks", 5).unwrap();
    assert_eq!(gui.get("count").unwrap(), Value::Number(5.0));
    assert_eq!(gui.get("greeting").unwrap(), "hi");
    assert_eq!(gui.data().get("clicks"), Some(Value::Number(5.0)));
}

#[test]
fn data_initial_from_markup() {
    let gui = Gui::builder(Engine::new())
        .name("test")
        .widget("Tally", Tally)
        .markup("<Window><Tally store='clicks:9'/></Window>")
        .build()
        .unwrap();
    assert_eq!(gui.get("clicks").unwrap(), "9");
}

/// Exposes a data cell without seeding it.
struct Scratch;

impl WidgetConstructor<Engine> for Scratch {
    fn bindings(&self) -> &'static [&'static str] {
        &["store"]
    }

    fn construct(&self, cx: &mut BuildCx<'_, Engine>) -> Result<Constructed<Engine>, GuiError> {
        let label = cx.toolkit.create("Label").map_err(GuiError::toolkit)?;
        Ok(Constructed::new(label).data("store", None))
    }
}

#[test]
fn unseeded_data_reads_empty() {
    let gui = Gui::builder(Engine::new())
        .name("test")
        .widget("Scratch", Scratch)
        .markup("<Window><Scratch store='x'/></Window>")
        .build()
        .unwrap();
    assert_eq!(gui.variables(), [("x".to_string(), vec![VariableKind::Data])]);
    assert_eq!(gui.get("x").unwrap(), Value::Str(String::new()));
    gui.set("x", "now").unwrap();
    assert_eq!(gui.get("x").unwrap(), "now");
}

#[test]
fn custom_widget_replaces_builtin() {
    let gui = Gui::builder(Engine::new())
        .name("test")
        .widget_fn("Label", |cx| {
            let frame = cx.toolkit.create("Frame").map_err(GuiError::toolkit)?;
            Ok(Constructed::new(frame))
        })
        .markup("<Window><Label/></Window>")
        .build()
        .unwrap();
    assert_eq!(content(&gui).class_name(), "Frame");
}

#[test]
fn externals() {
    let engine = Engine::new();
    let entry = engine.create("Entry").unwrap();
    let gui = Gui::builder(engine)
        .name("test")
        .object("search", entry.clone())
        .markup("<Window><External id='search'/></Window>")
        .build()
        .unwrap();
    assert_eq!(content(&gui), entry);

    let err = Gui::builder(Engine::new())
        .name("test")
        .markup("<Window><External id='nope'/></Window>")
        .build()
        .unwrap_err();
    assert!(matches!(err, GuiError::UnknownExternal { id } if id == "nope"));
}

// ── Events ────────────────────────────────────────────────────────────────

#[test]
fn callback_fires_once_per_emission() {
    let gui = gui("<Window><Button clicked='go'/></Window>");
    let (hits, callback) = counter();
    gui.on("go", callback).unwrap();
    content(&gui).emit("clicked").unwrap();
    assert_eq!(hits.get(), 1);
    content(&gui).emit("clicked").unwrap();
    assert_eq!(hits.get(), 2);
}

#[test]
fn last_registration_wins() {
    let gui = gui("<Window><Button clicked='go'/></Window>");
    let (first, a) = counter();
    let (second, b) = counter();
    gui.on("go", a).unwrap();
    gui.on("go", b).unwrap();
    content(&gui).emit("clicked").unwrap();
    assert_eq!((first.get(), second.get()), (0, 1));
}

#[test]
fn events_are_shared_between_widgets() {
    let gui = gui("<Window><VBox><Button clicked='go'/><Entry activate='go'/></VBox></Window>");
    let (hits, callback) = counter();
    gui.on("go", callback).unwrap();
    let children = content(&gui).children();
    children[0].emit("clicked").unwrap();
    children[1].emit("activate").unwrap();
    assert_eq!(hits.get(), 2);
}

#[test]
fn builder_events_and_unknown_event() {
    let (hits, callback) = counter();
    let gui = Gui::builder(Engine::new())
        .name("test")
        .markup("<Window><Button clicked='go'/></Window>")
        .event("go", callback)
        .build()
        .unwrap();
    content(&gui).emit("clicked").unwrap();
    assert_eq!(hits.get(), 1);

    let err = Gui::builder(Engine::new())
        .name("test")
        .markup("<Window/>")
        .event("nope", |_| {})
        .build()
        .unwrap_err();
    assert!(matches!(err, GuiError::UnknownVariable { .. }));
}

#[test]
fn callback_can_use_the_gui() {
    let gui = gui("<Window><VBox><Entry value='name:Ada' activate='greet'/><Label value='out'/></VBox></Window>");
    let shown = Rc::new(RefCell::new(String::new()));
    let sink = shown.clone();
    gui.on("greet", move |gui| {
        let greeting = format!("Hello, {}", gui.get("name").unwrap());
        gui.set("out", greeting.as_str()).unwrap();
        *sink.borrow_mut() = greeting;
    })
    .unwrap();
    content(&gui).children()[0].emit("activate").unwrap();
    assert_eq!(*shown.borrow(), "Hello, Ada");
    assert_eq!(content(&gui).children()[1].text("label").as_deref(), Some("Hello, Ada"));
}

#[test]
fn dropped_gui_silences_events() {
    let gui = gui("<Window><Button clicked='go'/></Window>");
    let (hits, callback) = counter();
    gui.on("go", callback).unwrap();
    let button = content(&gui);
    drop(gui);
    button.emit("clicked").unwrap();
    assert_eq!(hits.get(), 0);
}

// ── Loop control ──────────────────────────────────────────────────────────

#[test]
fn stop_without_loop() {
    let gui = gui("<Window/>");
    assert!(matches!(gui.run(false), Err(GuiError::NoActiveLoop)));
}

#[test]
fn run_shows_root_and_stops() {
    let engine = Engine::new();
    let gui = Gui::builder(engine.clone()).name("test").markup("<Window><Label/></Window>").build().unwrap();
    let g = gui.clone();
    engine.post(move || {
        assert_eq!(g.depth(), 1);
        g.run(false).unwrap();
        assert_eq!(g.depth(), 0);
    });
    gui.run(true).unwrap();
    assert!(content(&gui).is_visible());
    assert_eq!(gui.depth(), 0);
}

#[test]
fn nested_loops() {
    let engine = Engine::new();
    let gui = Gui::builder(engine.clone()).name("test").markup("<Window/>").build().unwrap();
    let depths = Rc::new(RefCell::new(Vec::new()));

    let (g, d) = (gui.clone(), depths.clone());
    engine.post(move || {
        d.borrow_mut().push(g.depth());
        g.run(true).unwrap();
        d.borrow_mut().push(g.depth());
    });
    let (g, d) = (gui.clone(), depths.clone());
    engine.post(move || {
        d.borrow_mut().push(g.depth());
        g.run(false).unwrap();
        d.borrow_mut().push(g.depth());
    });
    let g = gui.clone();
    engine.post(move || g.run(false).unwrap());

    gui.run(true).unwrap();
    assert_eq!(*depths.borrow(), [1, 2, 1, 1]);
    assert_eq!(gui.depth(), 0);
}

#[test]
fn starved_loop_is_a_toolkit_error() {
    let gui = gui("<Window/>");
    let err = gui.run(true).unwrap_err();
    let GuiError::Toolkit(source) = err else { panic!("expected a toolkit error") };
    assert_eq!(source.downcast_ref::<LoopError>(), Some(&LoopError::Starved { level: 1 }));
    assert_eq!(gui.depth(), 0);
}

#[test]
fn destroying_root_stops_loop() {
    let gui = gui("<Window><Label/></Window>");
    let root = gui.root().unwrap().clone();
    gui.toolkit().post(move || root.destroy());
    assert_eq!(gui.toolkit().pending(), 1);
    gui.run(true).unwrap();
    assert_eq!(gui.depth(), 0);
}

// ── Documents and files ───────────────────────────────────────────────────

#[test]
fn settings_from_document() {
    let gui = gui(
        "<gui>
            <Setting name='theme' value='dark'/>
            <Window title='t'/>
        </gui>",
    );
    assert_eq!(gui.setting("theme"), Some("dark"));
    assert_eq!(gui.setting("missing"), None);
    assert_eq!(gui.settings().keys().collect::<Vec<_>>(), ["theme"]);
    assert_eq!(gui.names(), ["t"]);
}

#[test]
fn document_with_two_windows() {
    assert!(matches!(build_err("<gui><Window/><Window/></gui>"), GuiError::MalformedTree(_)));
}

#[test]
fn loads_markup_file() {
    let path = std::env::temp_dir().join(format!("tapestry-scenario-{}.gui", std::process::id()));
    std::fs::write(&path, "<Window><Entry value='v:from file'/></Window>").unwrap();
    let gui = Gui::builder(Engine::new()).name("test").file(&path).build().unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(gui.get("v").unwrap(), "from file");
}

#[test]
fn missing_file_is_io_error() {
    let err = Gui::builder(Engine::new())
        .name("test")
        .file("/nonexistent/tapestry.gui")
        .build()
        .unwrap_err();
    assert!(matches!(err, GuiError::Io { .. }));
}
