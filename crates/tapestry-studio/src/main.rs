use anyhow::{Context, Result};

use tapestry_engine::logging::{init_logging, LoggingConfig};
use tapestry_engine::{Engine, Object, ObjectError};
use tapestry_ui::prelude::*;

const DEMO: &str = include_str!("../ui/studio.gui");

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║         TAPESTRY STUDIO v0.1           ║");
    println!("  ║   headless engine  ·  tapestry-ui      ║");
    println!("  ╚════════════════════════════════════════╝");
    println!();

    let builder = Gui::builder(Engine::new()).name("tapestry-studio");
    let builder = match std::env::args_os().nth(1) {
        Some(path) => builder.file(path),
        None => builder.markup(DEMO),
    };

    let gui = builder
        // ── EVENTS ────────────────────────────────────────────────────────
        .event("greet", |gui| {
            if let Err(e) = greet(gui) {
                log::error!("greet: {e}");
            }
        })
        .event("name_changed", |gui| {
            if let Ok(name) = gui.get("name") {
                log::info!("name is now `{name}`");
            }
        })
        .event("quit", |gui| {
            println!("  [QUIT] closing the window");
            if let Some(root) = gui.root() {
                root.destroy();
            }
        })
        .build()
        .context("building the studio GUI")?;

    if !gui.settings().is_empty() {
        println!("  Settings:");
        for (name, value) in gui.settings() {
            println!("    {name:<16} {value}");
        }
        println!();
    }

    println!("  Variables:");
    for (name, kinds) in gui.variables() {
        let kinds: Vec<String> = kinds.iter().map(ToString::to_string).collect();
        println!("    {name:<16} {}", kinds.join("+"));
    }
    println!();

    if let Some(root) = gui.root() {
        script(gui.toolkit(), root);
    }
    gui.run(true).context("running the main loop")?;
    log::info!("main loop finished");
    Ok(())
}

/// Writes a greeting built from the entry, mood and repeat count.
fn greet(gui: &Gui<Engine>) -> Result<(), GuiError> {
    let name = gui.get("name")?.into_text();
    let who = if name.is_empty() { "stranger".to_string() } else { name };
    let salutation = gui.setting("greeting").unwrap_or("Hi");
    let mood = gui.get("mood")?;
    let repeat = gui.get("repeat")?.to_number().unwrap_or(1.0).max(1.0) as usize;

    let line = vec![format!("{salutation}, {who}!"); repeat].join(" ");
    println!("  [GREET] {line} (feeling {mood})");
    gui.set("headline", line)
}

/// Queue the input a user would produce: type a name, pick a mood,
/// confirm, then press every button in document order.
fn script(engine: &Engine, root: &Object) {
    let entry = find(root, "Entry");
    if let Some(entry) = &entry {
        for typed in ["A", "Ad", "Ada"] {
            let entry = entry.clone();
            engine.post(move || report(entry.set_property("text", Property::from(typed))));
        }
    }
    if let Some(combo) = find(root, "ComboBoxText") {
        engine.post(move || report(combo.set_property("active", Property::Number(1.0))));
    }
    if let Some(entry) = entry {
        engine.post(move || report(entry.emit("activate")));
    }
    for button in all(root, "Button") {
        engine.post(move || report(button.emit("clicked")));
    }
    // Documents without a quit button still end the session.
    let root = root.clone();
    engine.post(move || root.destroy());
}

fn report(result: Result<(), ObjectError>) {
    if let Err(e) = result {
        log::warn!("scripted input failed: {e}");
    }
}

fn all(root: &Object, class: &str) -> Vec<Object> {
    let mut found = Vec::new();
    let mut stack = vec![root.clone()];
    while let Some(obj) = stack.pop() {
        if obj.class_name() == class {
            found.push(obj.clone());
        }
        stack.extend(obj.children().into_iter().rev());
    }
    found
}

fn find(root: &Object, class: &str) -> Option<Object> {
    all(root, class).into_iter().next()
}
