pub mod debate;
pub mod joined_debate;
pub mod leaderboard;
