use std::fmt::Write;

use geojson::{Feature, FeatureCollection, JsonValue};

use crate::consts::KML_NAMESPACE;

use super::config::{style_id, KmlStyle, OutputConfig};
use super::features::{collection_metadata, feature_ring};

/// Render the KML visualization document for a feature collection.
///
/// Output depends only on the collection and the styles: styles appear in
/// configured order and placemarks in feature order.
pub fn to_kml_string(collection: &FeatureCollection, output: &OutputConfig) -> String {
    let metadata = collection_metadata(collection);
    let meta = |key: &str, fallback: &str| -> String {
        metadata
            .and_then(|m| m.get(key))
            .map(json_text)
            .unwrap_or_else(|| fallback.to_string())
    };
    let date = meta("date", "Unknown");

    let mut kml = String::new();
    kml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(kml, "<kml xmlns=\"{KML_NAMESPACE}\">");
    kml.push_str("  <Document>\n");
    let _ = writeln!(kml, "    <name>Probability Areas - {}</name>", escape(&date));
    let _ = writeln!(
        kml,
        "    <description><![CDATA[\
         <h2>Probability Map</h2>\
         <p><b>Date:</b> {date}</p>\
         <p><b>Source:</b> {source}</p>\
         <p><b>Total Areas:</b> {total}</p>\
         <p><b>Coordinate System:</b> {crs}</p>\
         <p><b>Generated:</b> {generated}</p>\
         ]]></description>",
        date = cdata(&date),
        source = cdata(&meta("source", &output.source)),
        total = cdata(&meta("total_features", &collection.features.len().to_string())),
        crs = cdata(&meta("coordinate_system", &output.coordinate_system)),
        generated = cdata(&meta("processing_timestamp", "Unknown")),
    );

    for style in &output.styles {
        write_style(&mut kml, style);
    }

    kml.push_str("    <Folder>\n");
    let _ = writeln!(kml, "      <name>Probability Areas ({})</name>", escape(&date));
    let _ = writeln!(
        kml,
        "      <description>High probability areas detected on {}</description>",
        escape(&date)
    );
    for (i, feature) in collection.features.iter().enumerate() {
        write_placemark(&mut kml, feature, i);
    }
    kml.push_str("    </Folder>\n");
    kml.push_str("  </Document>\n");
    kml.push_str("</kml>\n");
    kml
}

fn write_style(kml: &mut String, style: &KmlStyle) {
    let _ = writeln!(kml, "    <Style id=\"{}\">", escape(&style.style_id()));
    kml.push_str("      <LineStyle>\n");
    let _ = writeln!(kml, "        <color>{}</color>", escape(&style.line_color));
    let _ = writeln!(kml, "        <width>{}</width>", style.line_width);
    kml.push_str("      </LineStyle>\n");
    kml.push_str("      <PolyStyle>\n");
    let _ = writeln!(kml, "        <color>{}</color>", escape(&style.fill_color));
    kml.push_str("        <fill>1</fill>\n");
    kml.push_str("        <outline>1</outline>\n");
    kml.push_str("      </PolyStyle>\n");
    kml.push_str("    </Style>\n");
}

fn write_placemark(kml: &mut String, feature: &Feature, index: usize) {
    let props = feature.properties.as_ref();
    let prop = |key: &str| -> String {
        props
            .and_then(|p| p.get(key))
            .map(json_text)
            .unwrap_or_else(|| "Unknown".to_string())
    };
    let probability = props
        .and_then(|p| p.get("probability"))
        .and_then(JsonValue::as_str)
        .unwrap_or("default");

    kml.push_str("      <Placemark>\n");
    let _ = writeln!(kml, "        <name>Area {}</name>", index + 1);
    let _ = writeln!(
        kml,
        "        <description><![CDATA[{}]]></description>",
        description_table(&prop)
    );
    let _ = writeln!(kml, "        <styleUrl>#{}</styleUrl>", escape(&style_id(probability)));

    if let Some(ring) = feature_ring(feature) {
        let coords: Vec<String> = ring
            .iter()
            .map(|(lon, lat)| format!("{lon},{lat},0"))
            .collect();
        kml.push_str("        <Polygon>\n");
        kml.push_str("          <tessellate>1</tessellate>\n");
        kml.push_str("          <altitudeMode>clampToGround</altitudeMode>\n");
        kml.push_str("          <outerBoundaryIs>\n");
        kml.push_str("            <LinearRing>\n");
        let _ = writeln!(kml, "              <coordinates>{}</coordinates>", coords.join(" "));
        kml.push_str("            </LinearRing>\n");
        kml.push_str("          </outerBoundaryIs>\n");
        kml.push_str("        </Polygon>\n");
    }
    kml.push_str("      </Placemark>\n");
}

fn description_table(prop: &dyn Fn(&str) -> String) -> String {
    let rows = [
        ("Date", "date"),
        ("Probability", "probability"),
        ("Area (pixels)", "area_pixels"),
        ("Region ID", "id"),
        ("Created", "created"),
    ];
    let mut html = String::from("<h3>Probability Area</h3><table border=\"1\" cellpadding=\"5\">");
    for (label, key) in rows {
        let _ = write!(
            html,
            "<tr><td><b>{label}:</b></td><td>{}</td></tr>",
            cdata(&prop(key))
        );
    }
    html.push_str("</table>");
    html
}

/// JSON scalar as display text; strings without quotes.
fn json_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Escape text for XML element content and attributes.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// CDATA sections cannot contain their own terminator.
fn cdata(text: &str) -> String {
    text.replace("]]>", "]]]]><![CDATA[>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_cdata_terminator_split() {
        assert_eq!(cdata("x]]>y"), "x]]]]><![CDATA[>y");
    }

    #[test]
    fn test_json_text_unquotes_strings() {
        assert_eq!(json_text(&JsonValue::from("abc")), "abc");
        assert_eq!(json_text(&JsonValue::from(12)), "12");
    }
}
