//! Phase machine shared by every form.
//!
//! Layers, bottom-up:
//!   - `state`    : `FormState<F>`, one variant per phase
//!   - `reducer`  : pure `(state, event) -> Option<Transition>`
//!   - `effects`  : declarative side effects the reducer asks for
//!   - `executor` : spawns backend calls with a deadline and cancellation
//!   - `machine`  : the container tying the above to a watch channel
//!
//! The reducer never performs I/O. Everything asynchronous goes through an
//! `Effect`, and its result re-enters the reducer as an event tagged with the
//! ticket it was started under.
pub mod effects;
pub mod executor;
pub mod machine;
pub mod reducer;
pub mod state;

pub use effects::{Effect, SubmissionOutcome};
pub use machine::SubmissionMachine;
pub use reducer::{FormEvent, Transition, reduce};
pub use state::{FormState, Phase, Ticket};
