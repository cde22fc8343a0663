//! Wire DTOs for the eBus endpoints.
//!
//! Field names mirror the identifiers the stop-list pages use
//! (`GoDirectionRoute`, `item.UniStopId`, ...), so the JSON the pages
//! fetch deserializes directly.

use serde::Deserialize;

/// Response body for `/Stop/RoutesOfStop`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoutesOfStopDto {
    #[serde(default)]
    pub routes: Vec<RouteItemDto>,
}

/// One route serving a stop.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteItemDto {
    pub route_name: String,
}

/// Response body for `/Route/StopsOfRoute`: both directed stop lists.
#[derive(Debug, Deserialize)]
pub struct StopsOfRouteDto {
    #[serde(rename = "GoDirectionRoute", default)]
    pub go: Vec<RouteStopDto>,

    #[serde(rename = "BackDirectionRoute", default)]
    pub back: Vec<RouteStopDto>,
}

/// One stop entry within a directed stop list, in document order.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteStopDto {
    pub uni_stop_id: String,
    pub stop_name: String,
    pub latitude: f64,
    pub longitude: f64,

    /// Inline live-status field: a countdown, an arrived marker, or
    /// empty when unavailable.
    #[serde(default)]
    pub estimate_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_routes_of_stop() {
        let json = r#"{
            "Routes": [
                { "RouteName": "信義幹線" },
                { "RouteName": "204" }
            ]
        }"#;

        let dto: RoutesOfStopDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.routes.len(), 2);
        assert_eq!(dto.routes[0].route_name, "信義幹線");
        assert_eq!(dto.routes[1].route_name, "204");
    }

    #[test]
    fn parse_stops_of_route() {
        let json = r#"{
            "GoDirectionRoute": [
                {
                    "UniStopId": "1813341900",
                    "StopName": "忠孝新生",
                    "Latitude": 25.042356,
                    "Longitude": 121.532905,
                    "EstimateTime": "3分"
                },
                {
                    "UniStopId": "1813342200",
                    "StopName": "市政府",
                    "Latitude": 25.041171,
                    "Longitude": 121.565228,
                    "EstimateTime": ""
                }
            ],
            "BackDirectionRoute": []
        }"#;

        let dto: StopsOfRouteDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.go.len(), 2);
        assert!(dto.back.is_empty());
        assert_eq!(dto.go[0].stop_name, "忠孝新生");
        assert_eq!(dto.go[0].estimate_time, "3分");
        assert_eq!(dto.go[1].estimate_time, "");
    }

    #[test]
    fn missing_direction_defaults_to_empty() {
        let dto: StopsOfRouteDto = serde_json::from_str("{}").unwrap();
        assert!(dto.go.is_empty());
        assert!(dto.back.is_empty());
    }
}
