//! The decide half of the wizard.
//!
//! [`WizardController`](crate::WizardController) implements [`Machine`]: it
//! takes one [`WizardEvent`](crate::WizardEvent) at a time, updates the
//! answers it owns, and at most hands back a
//! [`WizardCommand`](crate::WizardCommand). It never performs the command.
//! [`WizardSession`](crate::WizardSession) carries the command out by giving
//! the payload to its submitter.

/// Something that turns events into optional commands without doing IO.
///
/// # Example
///
/// ```
/// use diagnostic::Machine;
///
/// enum Toggle {
///     Flip,
/// }
///
/// struct Light {
///     on: bool,
/// }
///
/// impl Machine for Light {
///     type Event = Toggle;
///     type Command = bool;
///
///     fn decide(&mut self, event: &Toggle) -> Option<bool> {
///         match event {
///             Toggle::Flip => {
///                 self.on = !self.on;
///                 self.on.then_some(true)
///             }
///         }
///     }
/// }
///
/// let mut light = Light { on: false };
/// assert_eq!(light.decide(&Toggle::Flip), Some(true));
/// assert_eq!(light.decide(&Toggle::Flip), None);
/// ```
pub trait Machine {
    type Event;
    type Command;

    /// Apply `event` to the machine's own state. Hosts call this one event
    /// at a time and execute whatever command comes back.
    fn decide(&mut self, event: &Self::Event) -> Option<Self::Command>;
}
