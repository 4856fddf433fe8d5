//! UI label <-> backend slug tables.

pub fn ui_category_to_backend_vibe(category: &str) -> Option<&'static str> {
    let label = category.to_lowercase();

    if label.contains("study") || label.contains("café") || label.contains("cafe") {
        return Some("study");
    }
    if label.contains("free events") || label.contains("pop-ups") || label.contains("pop ups") {
        return Some("free_events");
    }
    if label.contains("food") {
        return Some("food");
    }
    if label.contains("nightlife") {
        return Some("nightlife");
    }
    if label.contains("explore") || label.contains("open to anything") {
        return Some("explore");
    }
    None
}

pub fn backend_vibe_to_ui_category(vibe: &str) -> Option<&'static str> {
    match vibe.to_lowercase().as_str() {
        "study" => Some("Study Spots / Cozy Cafés"),
        "free_events" => Some("Free Events & Pop-Ups"),
        "food" => Some("Food Around Campus"),
        "nightlife" => Some("Nightlife"),
        "explore" => Some("Explore All / I'm open to anything"),
        _ => None,
    }
}

/// "Other" and unknown labels are not sent to the backend.
pub fn ui_diet_to_backend(label: &str) -> Option<&'static str> {
    match label.to_lowercase().as_str() {
        "vegetarian" => Some("vegetarian"),
        "vegan" => Some("vegan"),
        "halal" => Some("halal"),
        "kosher" => Some("kosher"),
        "gluten-free" => Some("gluten-free"),
        "dairy-free" => Some("dairy-free"),
        "pork-free" => Some("pork-free"),
        "seafood allergy" => Some("seafood-allergy"),
        _ => None,
    }
}

pub fn backend_diet_to_ui(slug: &str) -> Option<&'static str> {
    match slug.to_lowercase().as_str() {
        "vegetarian" => Some("Vegetarian"),
        "vegan" => Some("Vegan"),
        "halal" => Some("Halal"),
        "kosher" => Some("Kosher"),
        "gluten-free" => Some("Gluten-Free"),
        "dairy-free" => Some("Dairy-Free"),
        "pork-free" => Some("Pork-Free"),
        "seafood-allergy" => Some("Seafood Allergy"),
        _ => None,
    }
}
