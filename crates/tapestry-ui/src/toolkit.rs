use crate::registry::Registry;

/// The contract a native toolkit binding fulfils.
///
/// Widget state and signals are reached through the closures each
/// constructor hands back (see [`Constructed`](crate::widget::Constructed)),
/// so the toolkit itself only has to provide the loop and the root hooks.
pub trait Toolkit: 'static {
    /// Native widget handle. Cloning must yield another handle to the same widget.
    type Handle: Clone + 'static;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Make the root widget and its descendants visible.
    fn show(&self, root: &Self::Handle);

    /// Run `hook` when the root widget is destroyed natively.
    fn on_destroy(&self, root: &Self::Handle, hook: Box<dyn Fn()>);

    /// Enter one level of the native blocking dispatch loop.
    ///
    /// Must be re-entrant: a callback dispatched by this loop may call it again.
    fn run_loop(&self) -> Result<(), Self::Error>;

    /// Ask the innermost running loop level to return.
    fn quit_loop(&self);

    /// Register the toolkit's built-in widget constructors.
    fn register_builtins(registry: &mut Registry<Self>)
    where
        Self: Sized,
    {
        let _ = registry;
    }
}
