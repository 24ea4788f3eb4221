pub enum Action {
    /// Runs one full turn against the assistant with the given user text.
    SubmitTurn(String),
}
