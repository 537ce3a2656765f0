pub mod time;
pub mod schedule;
pub mod pool;
pub mod round;
pub mod matching;
pub mod timer;
pub mod session;
