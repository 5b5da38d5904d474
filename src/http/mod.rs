//! REST transport over the queue engine.
//!
//! | Method | Path | Operation |
//! |---|---|---|
//! | `POST` | `/api/chat/start?is_office_hours=` | submit |
//! | `POST` | `/api/chat/poll/{id}` | record liveness |
//! | `GET` | `/api/chat/status/{id}` | status (404 when not found) |
//! | `POST` | `/api/chat/shift/{shift}` | change shift |
//! | `GET` | `/health` | health check |

pub mod handlers;
pub mod server;
