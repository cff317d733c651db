// Shared fixtures
mod support;
