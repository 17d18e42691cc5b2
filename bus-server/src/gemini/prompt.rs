//! Prompt construction for the suggestion model.

use super::types::ConnectionQuery;

/// Build the prompt for one suggestion request.
///
/// The prompt constrains the model to the catalog lines in the query and
/// fixes the output contract the rest of the pipeline depends on:
/// - a JSON object with a `nearbyConnections` array, empty when no
///   reasonable connection exists;
/// - multi-leg directions formatted as numbered `Step 1: …` steps using
///   Take/Transfer/Arrive wording, which the step parser splits on.
pub fn build_prompt(query: &ConnectionQuery) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str(
        "You are a helpful assistant that suggests bus route connections in Karachi \
         when a direct route is not found.\n\n",
    );
    prompt.push_str(&format!(
        "The rider wants to travel from \"{}\" to \"{}\".\n\n",
        query.origin, query.destination
    ));
    prompt.push_str("These are the only bus routes that exist, with their stops in order:\n");
    for line in &query.available_routes {
        prompt.push_str("- ");
        prompt.push_str(line);
        prompt.push('\n');
    }
    prompt.push_str(
        "\nSuggest possible bus route connections to reach the destination from the \
         origin, using only the routes listed above. Never invent a route that is \
         not in the list.\n\n\
         When a connection involves more than one leg, write the details as \
         numbered steps in the form \"Step 1: ...\", \"Step 2: ...\", and so on. \
         Use the word \"Take\" when boarding a bus, \"Transfer\" when changing \
         buses, and \"Arrive\" for the final stop. Include an estimated travel \
         time in minutes when you can.\n\n\
         If no reasonable connection can be made from the available routes, return \
         an empty array for nearbyConnections.\n\n\
         Respond with a JSON object of exactly this shape and nothing else:\n\
         {\"nearbyConnections\": [{\"route\": \"<route name>\", \"details\": \"<directions>\"}]}",
    );

    prompt
}
