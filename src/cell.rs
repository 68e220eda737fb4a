use crate::shape::Connections;
use crate::symbol::Symbol;

/// Anything a grid can hold that may or may not already show a connection pattern.
///
/// Finished boards hold [`Symbol`]s. The generator fills a grid of `Option<Symbol>` where [`None`]
/// marks a cell not yet placed, which constrains none of its neighbours.
pub trait Connects: Copy {
    /// The stubs this cell shows, or [`None`] if it shows nothing yet.
    fn connections(&self) -> Option<Connections>;
}

impl Connects for Symbol {
    fn connections(&self) -> Option<Connections> {
        Some(Symbol::connections(self))
    }
}

impl Connects for Option<Symbol> {
    fn connections(&self) -> Option<Connections> {
        self.map(|symbol| symbol.connections())
    }
}
