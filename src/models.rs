// src/models.rs

pub mod auth;
pub mod crm;
pub mod dashboard;
pub mod inventory;
pub mod sales;
pub mod tenancy;
