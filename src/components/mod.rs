pub mod alt_routes;
pub mod app;
pub mod location_panel;
pub mod map_controls;
pub mod map_view;
pub mod network_panel;
pub mod notification;
pub mod suggestions_panel;
pub mod time_controls;
pub mod traffic_chart;
pub mod weather_tab;
