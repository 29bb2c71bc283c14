#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::params::ParamId;

/// Parameter change sent from a control thread to the audio thread.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ParamMessage {
    Set(ParamId, f32),
    Bypass(bool),
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ParamMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ParamMessage> {
    fn pop(&mut self) -> Option<ParamMessage> {
        Consumer::pop(self).ok()
    }
}
