/// Per-capita splitting of shared bills
pub mod allocation;
/// Bulletin board posts
pub mod bulletin;
/// Monthly internet and utilities entries
pub mod charges;
/// Resident registration, login and roles
pub mod identity;
/// Payments against charge periods
pub mod ledger;
/// Periods combined with their shares and payments
pub mod overview;
