//! Journal entries: daily photo+reflection capture, browsing, and cleanup.
//!
//! A day holds at most 10 entries per user; `entry_order` records the
//! position within the day and is never reused after deletes.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/entries` | Yes | Create an entry (multipart photo upload) |
//! | GET | `/api/entries` | Yes | All entries, newest first |
//! | DELETE | `/api/entries` | Yes | Clear all entries and photos |
//! | GET | `/api/entries/today` | Yes | Today's entries |
//! | GET | `/api/entries/date/{date}` | Yes | Entries for one date |
//! | GET | `/api/entries/calendar/{year}/{month}` | Yes | Per-date counts |
//! | GET | `/api/entries/export` | Yes | JSON export of the full history |
//! | DELETE | `/api/entries/{id}` | Yes | Delete one entry and its photo |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::EntryService;
