use super::ReportableComponent;
use crate::Result;
use crate::measures::{Measure, MeasureValue, MetricType};
use core::fmt::Write;
use serde_json::json;

#[expect(unused_results, reason = "Map::insert never replaces an entry here")]
pub fn generate<W: Write>(components: &[ReportableComponent], writer: &mut W) -> Result<()> {
    let mut component_data = Vec::with_capacity(components.len());

    for component in components {
        let mut component_obj = serde_json::Map::new();
        component_obj.insert("key".to_string(), json!(component.key.as_str()));
        component_obj.insert("type".to_string(), json!(component.component_type.to_string()));
        component_obj.insert("depth".to_string(), json!(component.depth));

        let mut measures_obj = serde_json::Map::new();
        for measure in &component.measures {
            let mut measure_obj = serde_json::Map::new();
            measure_obj.insert("name".to_string(), json!(measure.metric_name.as_str()));
            measure_obj.insert("value".to_string(), measure_value_to_json(&measure.measure, measure.value_type));

            if let Some(variations) = measure.measure.variations() {
                let variations_obj: serde_json::Map<_, _> = variations
                    .iter()
                    .map(|(index, value)| (index.to_string(), json!(value)))
                    .collect();
                measure_obj.insert("variations".to_string(), json!(variations_obj));
            }

            measures_obj.insert(measure.metric_key.to_string(), json!(measure_obj));
        }

        component_obj.insert("measures".to_string(), json!(measures_obj));
        component_data.push(json!(component_obj));
    }

    let output = json!({
        "components": component_data
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn measure_value_to_json(measure: &Measure, value_type: MetricType) -> serde_json::Value {
    if value_type == MetricType::Rating
        && let Some(rating) = measure.rating_value()
    {
        return json!(rating.to_string());
    }

    match measure.value() {
        MeasureValue::NoValue => serde_json::Value::Null,
        MeasureValue::Int(i) => json!(i),
        MeasureValue::Long(l) => json!(l),
        MeasureValue::Double(d) => json!(d),
        MeasureValue::Boolean(b) => json!(b),
        MeasureValue::String(s) => {
            // impact breakdowns are JSON themselves, so keep them structured
            if value_type == MetricType::Data
                && let Ok(value @ serde_json::Value::Object(_)) = serde_json::from_str(s)
            {
                value
            } else {
                json!(s.as_str())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentType;
    use crate::measures::{MeasureVariations, Rating};
    use crate::reports::ReportableMeasure;

    fn reportable(metric_key: &str, value_type: MetricType, measure: Measure) -> ReportableMeasure {
        ReportableMeasure {
            metric_key: metric_key.into(),
            metric_name: metric_key.into(),
            value_type,
            measure,
        }
    }

    #[test]
    fn test_measure_value_to_json_scalars() {
        assert_eq!(measure_value_to_json(&Measure::builder().create_int(3), MetricType::Int), json!(3));
        assert_eq!(measure_value_to_json(&Measure::builder().create_long(1 << 40), MetricType::Long), json!(1_i64 << 40));
        assert_eq!(measure_value_to_json(&Measure::builder().create_double(1.5), MetricType::Float), json!(1.5));
        assert_eq!(measure_value_to_json(&Measure::builder().create_bool(false), MetricType::Bool), json!(false));
        assert_eq!(measure_value_to_json(&Measure::builder().create_no_value(), MetricType::Int), json!(null));
    }

    #[test]
    fn test_measure_value_to_json_rating() {
        let measure = Measure::builder().create_rating(Rating::E);
        assert_eq!(measure_value_to_json(&measure, MetricType::Rating), json!("E"));
    }

    #[test]
    fn test_measure_value_to_json_data() {
        let impacts = Measure::builder().create_string(r#"{"HIGH":2,"total":2}"#);
        assert_eq!(measure_value_to_json(&impacts, MetricType::Data), json!({ "HIGH": 2, "total": 2 }));

        let distribution = Measure::builder().create_string("1=2;5=0");
        assert_eq!(measure_value_to_json(&distribution, MetricType::Distribution), json!("1=2;5=0"));
    }

    #[test]
    fn test_generate_empty() {
        let mut output = String::new();
        generate(&[], &mut output).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, json!({ "components": [] }));
    }

    #[test]
    fn test_generate_components() {
        let components = vec![
            ReportableComponent {
                key: "project".into(),
                component_type: ComponentType::Project,
                depth: 0,
                measures: vec![
                    reportable("ncloc", MetricType::Int, Measure::builder().create_int(8)),
                    reportable(
                        "new_lines",
                        MetricType::Int,
                        Measure::builder()
                            .variations(MeasureVariations::from_indexed([(1, 6.0)]).unwrap())
                            .create_no_value(),
                    ),
                ],
            },
            ReportableComponent {
                key: "src".into(),
                component_type: ComponentType::Directory,
                depth: 1,
                measures: vec![],
            },
        ];

        let mut output = String::new();
        generate(&components, &mut output).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            parsed,
            json!({
                "components": [
                    {
                        "key": "project",
                        "type": "PROJECT",
                        "depth": 0,
                        "measures": {
                            "ncloc": { "name": "ncloc", "value": 8 },
                            "new_lines": { "name": "new_lines", "value": null, "variations": { "1": 6.0 } }
                        }
                    },
                    { "key": "src", "type": "DIRECTORY", "depth": 1, "measures": {} }
                ]
            })
        );
    }
}
