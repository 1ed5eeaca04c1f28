// This is the single integration test harness for the root package. Most
// modules exercise grape::Regex from a different angle; `cli` runs the
// `grape` binary itself.

mod cli;
