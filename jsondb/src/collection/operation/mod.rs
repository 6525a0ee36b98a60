mod aggregate_operations;
mod index_operations;
mod read_operations;
mod write_operations;
