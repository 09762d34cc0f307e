pub mod generate;
pub mod loader;
pub mod resolve;
pub mod tokenizer;

pub use generate::{generate, CausalModel, GenerationParams, LlamaRunner};
pub use loader::{eos_ids, parse_dtype, ModelLoader};
pub use resolve::{resolve_model_dir, resolve_model_dir_with_error};
pub use tokenizer::TokenizerWrapper;
