pub mod image_service;
