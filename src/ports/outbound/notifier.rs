/// Notifier port for user-visible messages
///
/// This port abstracts where notifications go (stderr, a UI toast area, a
/// test buffer). Notifications never interrupt the flow that emits them.
pub trait Notifier {
    /// Reports an informational message
    fn report(&self, message: &str);

    /// Reports a non-blocking warning (data anomalies, ignored config keys)
    fn report_warning(&self, message: &str);

    /// Reports a failed or refused operation
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);

    /// A backend call started; mutating actions are disabled until it ends
    fn start_loading(&self, message: &str);

    /// The pending backend call resolved or failed
    fn finish_loading(&self);
}
