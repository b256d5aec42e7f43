use tagvault::Store;

pub struct AppState {
    pub store: Store,
    /// Cleared by `exit` or end of input.
    pub running: bool,
    /// Set by commands that change what a save would write.
    pub unsaved: bool,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            running: true,
            unsaved: false,
        }
    }
}
