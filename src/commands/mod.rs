pub mod check_health;
pub mod serve;
