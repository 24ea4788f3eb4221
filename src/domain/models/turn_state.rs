/// Progress of a single turn. Both `Completed` and `Errored` return to `Idle`
/// once the transcript has been updated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TurnState {
    #[default]
    Idle,
    Submitted,
    Running,
    Completed,
    Errored,
}
