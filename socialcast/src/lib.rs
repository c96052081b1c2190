#![doc = "socialcast: CLI crate. All business logic lives in socialcast-core."]

pub mod cli;
