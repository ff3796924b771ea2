mod common;
mod debate_tests;
