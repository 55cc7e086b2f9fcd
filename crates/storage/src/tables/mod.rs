pub mod best_update;
pub mod finalized_checkpoint_record;
pub mod latest_update;
pub mod ssz_encoder;
pub mod table;
