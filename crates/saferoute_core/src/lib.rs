pub mod analysis;
pub mod bbox;
pub mod congestion;
pub mod encoded_polyline;
pub mod geopoint;
pub mod locations;
pub mod prompts;
pub mod route_leg;
pub mod sampler;
