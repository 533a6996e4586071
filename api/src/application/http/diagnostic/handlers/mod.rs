pub mod analyze_eye;
pub mod analyze_skin;
pub mod ping;
