use super::maps;
use crate::types::TripRequest;

/// Build the itinerary prompt sent to the text-generation service
pub fn build_trip_prompt(request: &TripRequest) -> String {
    let (start_date, end_date) = request.formatted_dates();
    let example_query = maps::search_query("Eiffel Tower Paris");

    format!(
        r#"You are TripMateAI, an expert travel planner. Create a detailed, day-by-day travel itinerary.
Your response must be in Markdown format.

**Travel Details:**
- **Origin:** {origin}
- **Destination:** {destination}
- **Travel Dates:** {start_date} to {end_date}
- **User Interests:** {interests}

**Your Task:**
Generate a complete travel plan that includes the following for each day:
1.  **🏨 Suggested Hotels:** List 3 hotel recommendations (budget, mid-range, luxury) with a brief description. Do not make up websites, just provide names.
2.  **🗺️ Day-by-Day Itinerary:** Provide a morning, afternoon, and evening plan for each day.
3.  **🍴 Restaurant Recommendations:** Suggest 2-3 popular restaurants for lunch and dinner, mentioning the type of cuisine.
4.  **🎯 Activities:** Tailor activities to the user's interests.
5.  **📍 Google Maps Links:** For each location (hotel, restaurant, activity), provide a valid Google Maps search link in the format: `[Location Name]({search_base}URL_ENCODED_LOCATION_NAME)`. For example, for the Eiffel Tower in Paris, the query would be `{example_query}`.

Structure your entire response using Markdown with clear headings. Start with a summary of the trip.

**Example Structure for a Day:**
---
### **Day 1: Arrival and Exploration**

**Morning (9:00 AM - 12:00 PM):**
- Arrive at [Airport/Station].
- Check into your hotel.

**Lunch (12:30 PM):**
- **[Restaurant Name]({search_base}...):** Brief description of the restaurant.

**Afternoon (2:00 PM - 5:00 PM):**
- **[Activity/Landmark Name]({search_base}...):** Description of the activity.

**Evening (7:00 PM onwards):**
- **Dinner at [Restaurant Name]({search_base}...):** Description.
- **[Evening Activity]({search_base}...):** Description.

---
Now, generate the plan for the user's trip.
"#,
        origin = request.origin,
        destination = request.destination,
        start_date = start_date,
        end_date = end_date,
        interests = request.interests_or_default(),
        search_base = maps::SEARCH_BASE,
        example_query = example_query,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TripForm, DEFAULT_INTERESTS};

    fn request(interests: &str) -> TripRequest {
        TripForm::new(
            "New York, USA",
            "Paris, France",
            "2025-06-01",
            "2025-06-03",
            interests,
        )
        .to_request()
        .unwrap()
    }

    #[test]
    fn test_prompt_contains_trip_details() {
        let prompt = build_trip_prompt(&request(""));

        assert!(prompt.contains("New York, USA"));
        assert!(prompt.contains("Paris, France"));
        assert!(prompt.contains("2025-06-01 to 2025-06-03"));
        assert!(prompt.contains("General sightseeing, food, and culture."));
        assert!(prompt.contains(DEFAULT_INTERESTS));
    }

    #[test]
    fn test_prompt_uses_given_interests() {
        let prompt = build_trip_prompt(&request("nature, history, food, hiking"));

        assert!(prompt.contains("- **User Interests:** nature, history, food, hiking"));
        assert!(!prompt.contains(DEFAULT_INTERESTS));
    }

    #[test]
    fn test_prompt_asks_for_map_links() {
        let prompt = build_trip_prompt(&request(""));

        assert!(prompt.contains(
            "`[Location Name](https://www.google.com/maps/search/?api=1&query=URL_ENCODED_LOCATION_NAME)`"
        ));
        assert!(prompt.contains("`Eiffel+Tower+Paris`"));
        assert!(prompt.contains("budget, mid-range, luxury"));
        assert!(prompt.contains("morning, afternoon, and evening plan"));
    }

    #[test]
    fn test_prompt_keeps_padded_values_verbatim() {
        let request = TripForm::new(" Rome ", "Paris, France", "2025-06-01", "2025-06-03", "  museums ")
            .to_request()
            .unwrap();
        let prompt = build_trip_prompt(&request);

        assert!(prompt.contains("- **Origin:**  Rome \n"));
        assert!(prompt.contains("- **User Interests:**   museums \n"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(
            build_trip_prompt(&request("food")),
            build_trip_prompt(&request("food"))
        );
    }
}
