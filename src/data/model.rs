//! Read-only view of the host simulation model.

/// The part of the host model the aggregator reads every tick.
///
/// Implementations expose the model's property tree by value: the
/// aggregator copies every sample into its own records and never holds a
/// reference into the model between ticks.
pub trait ModelState {
    /// Simulated time advanced by one tick.
    fn modeling_stepsize(&self) -> f64;

    /// Current value of `prop` on component `model`.
    ///
    /// Returns `None` if the component or property does not exist or is
    /// not numeric.
    fn property(&self, model: &str, prop: &str) -> Option<f64>;

    /// Check whether the model exposes a numeric `model.prop`.
    fn has_property(&self, model: &str, prop: &str) -> bool {
        self.property(model, prop).is_some()
    }
}
