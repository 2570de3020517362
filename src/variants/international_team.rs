//! Foreign line-up of the day
//!
//! Same board as the national variant, without hints.

use crate::{api::payload::TeamPayload, session::Rules};

use super::{Setup, team};

pub(super) fn setup(payload: TeamPayload) -> Setup {
    team::setup(payload, Rules::reveal_all(), false)
}
