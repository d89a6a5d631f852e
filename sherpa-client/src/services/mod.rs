pub mod stage1_service;
