pub mod assistants;
