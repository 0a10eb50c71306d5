pub mod league;
pub mod marketplace;
pub mod notifications;
pub mod team;
pub mod tutorials;
