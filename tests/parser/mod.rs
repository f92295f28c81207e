mod tests_concurrency;
mod tests_diagnostics;
mod tests_incremental;
mod tests_scenarios;
