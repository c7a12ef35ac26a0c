mod common;
mod scorers;
