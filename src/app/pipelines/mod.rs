pub mod recompress_pipeline;
