pub mod search_service;

pub use search_service::{
    request_search, run_search, SearchError, SearchRequest, SearchServiceMessage, WeatherServices,
};
