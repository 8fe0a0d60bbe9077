pub mod api_routes;
pub mod asset_routes;
