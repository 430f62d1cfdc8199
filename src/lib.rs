//! Analytical core for NBA player-impact exploration: an immutable season
//! snapshot plus pure derived views (team subsets, top-10 leaderboards,
//! an efficiency-vs-volume quadrant classification, and normalized profile
//! vectors for single-player comparison).

pub mod dataset;
pub mod error;
pub mod leaderboard;
pub mod profile;
pub mod quadrants;
pub mod report_export;
