pub mod answer;
pub mod evidence;
pub mod question;
