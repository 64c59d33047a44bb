// Caller layer around the classifier: reads text input, picks "today" and renders results.

pub mod batch;
pub mod commands;
pub mod demo;
pub mod interactive;
pub mod report;
