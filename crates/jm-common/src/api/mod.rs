pub mod recommendation;
pub mod requests;
