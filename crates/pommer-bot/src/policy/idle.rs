use super::{Policy, PolicyContext};
use crate::action::Action;

/// Always stands still.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdlePolicy;

impl Policy for IdlePolicy {
    fn choose_action(&mut self, _ctx: &PolicyContext) -> Action {
        Action::Stop
    }
}
