use rentscout_maps::{CategoryGroup, CategoryOutcome, Place, Route};
use rentscout_pipeline::Survey;

use super::{escape, layout};

/// Maps link, commute and one section per category.
pub fn result_page(survey: &Survey) -> String {
    let maps_url = escape(&survey.maps_url);
    let mut content = format!("<a href=\"{maps_url}\" target=\"_blank\">{maps_url}</a>\n");

    content.push_str(&route_section(&survey.route));
    for group in &survey.points_of_interest {
        content.push_str(&category_section(group));
    }

    layout(&content)
}

fn route_section(route: &Route) -> String {
    format!(
        "<div>\n<h2>Commute</h2>\n<p>{} - {}</p>\n\
<a href=\"{}\" target=\"_blank\">Directions</a>\n</div>\n",
        escape(&route.modes.join(", ")),
        escape(&route.duration),
        escape(&route.directions_link),
    )
}

fn category_section(group: &CategoryGroup) -> String {
    let body = match &group.outcome {
        CategoryOutcome::Places { places } => places.iter().map(place_item).collect::<String>(),
        CategoryOutcome::Failed { error } => format!("<p>{}</p>\n", escape(error)),
    };
    format!(
        "<div>\n<h2>Category: {}</h2>\n{body}</div>\n",
        escape(group.category)
    )
}

fn place_item(place: &Place) -> String {
    format!(
        "<div>\n<a href=\"{}\" target=\"_blank\"><h3>{}</h3></a>\n<p>{} m - {}, {}</p>\n</div>\n",
        escape(&place.maps_link),
        escape(&place.name),
        place.distance_m,
        escape(&place.rating),
        escape(&place.types.join(", ")),
    )
}
