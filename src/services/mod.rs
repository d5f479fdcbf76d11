pub mod chart_controller;
pub mod chart_service;
pub mod crosshair_service;
pub mod page_service;
pub mod series_service;
