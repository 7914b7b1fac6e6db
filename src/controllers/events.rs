use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    domain::calendar::{AggregationResult, CalendarServiceApi},
    error::AppResult,
};

pub struct EventsController {
    calendar_service: Arc<dyn CalendarServiceApi>,
}

impl EventsController {
    pub fn new(calendar_service: Arc<dyn CalendarServiceApi>) -> Self {
        Self { calendar_service }
    }

    /// GET /events - Merged events of all configured feeds
    pub async fn get_events(
        State(controller): State<Arc<EventsController>>,
    ) -> AppResult<Json<Arc<AggregationResult>>> {
        tracing::debug!("Handling /events request");
        let result = controller.calendar_service.get_events().await?;
        Ok(Json(result))
    }
}
