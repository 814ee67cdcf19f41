/// Network adapters for the BOM REST backend
mod http_bom_repository;

pub use http_bom_repository::HttpBomRepository;
