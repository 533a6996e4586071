pub mod analyze_history;
