use crate::db::OrmConn;

/// Shared handler state. The connection is opened once in `main` and closed on shutdown.
#[derive(Clone)]
pub struct AppState {
    pub orm: OrmConn,
}
