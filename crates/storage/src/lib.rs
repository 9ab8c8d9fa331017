#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod json_store;
mod memory;

pub use json_store::JsonStore;
pub use memory::MemoryStore;

#[cfg(test)]
mod tests {
    pub mod data;
}
