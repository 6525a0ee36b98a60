mod aggregate_test;
mod collection_test;
mod find_test;
mod index_test;
mod insert_test;
mod persistence_test;
mod update_test;
