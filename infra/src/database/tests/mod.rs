#[cfg(test)]
mod mapping_tests;
