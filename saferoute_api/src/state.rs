use std::time::Duration;

use saferoute_providers::{
    gemini::GeminiClient, google_maps::GoogleMapsClient, openweather::OpenWeatherClient,
    ticketmaster::TicketmasterClient, tomtom::TomTomClient,
};

use crate::config::Config;

pub struct AppState {
    pub maps: GoogleMapsClient,
    pub assistant: GeminiClient,
    pub weather: OpenWeatherClient,
    pub events: TicketmasterClient,
    pub incidents: TomTomClient,
    pub lookup_timeout: Duration,
    pub analysis_timeout: Duration,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            maps: GoogleMapsClient::new(config.google_maps),
            assistant: GeminiClient::new(config.gemini, config.gemini_model),
            weather: OpenWeatherClient::new(config.openweather),
            events: TicketmasterClient::new(config.ticketmaster),
            incidents: TomTomClient::new(config.tomtom),
            lookup_timeout: config.lookup_timeout,
            analysis_timeout: config.analysis_timeout,
        }
    }
}
