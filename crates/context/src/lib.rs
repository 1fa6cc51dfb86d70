//! Knowledge prioritization and prompt-budget packing.
//!
//! This crate is the console engine's one real algorithmic core: it
//! selects which knowledge shards accompany each request to the
//! generative backend under a hard character budget, and assembles the
//! final system instruction around the packed block.

pub mod instruction;
pub mod packer;

pub use instruction::{
    NULL_KNOWLEDGE, SystemInstruction, build_system_instruction, image_prompt, synapse_entry,
    video_prompt,
};
pub use packer::{ENTRY_SEPARATOR, PackedContext, pack_knowledge};
