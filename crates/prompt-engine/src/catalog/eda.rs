//! Exploratory data analysis for tabular datasets.

use super::{StageDef, StrategyDef, build_pipeline};
use crate::error::Result;
use crate::pipeline::Pipeline;

pub const PIPELINE_ID: &str = "EDA";

const DESCRIPTION: &str = "Use to perform structured exploratory data analysis (EDA) across key \
    stages such as missing value handling, outlier detection, type normalization and target \
    analysis, to assess data quality and model readiness.";

macro_rules! prompt {
    ($name:literal) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/prompts/eda/", $name, ".md"))
    };
}

const STAGES: &[StageDef] = &[
    StageDef {
        id: "cardinality_analysis",
        description: "Use to assess feature uniqueness and detect high/low cardinality, which \
            impacts encoding and model interpretability.",
        strategies: &[
            StrategyDef {
                id: "unique_ratio",
                description: "Use to identify features with a high or low ratio of unique \
                    values, indicating whether a feature is categorical or continuous.",
                prompt: prompt!("unique_ratio"),
            },
            StrategyDef {
                id: "tag_low_cardinality",
                description: "Use to flag features with very few unique values for \
                    specialized encoding or aggregation.",
                prompt: prompt!("tag_low_cardinality"),
            },
        ],
    },
    StageDef {
        id: "missing_values",
        description: "Use to identify and impute missing values using statistical or \
            domain-aware techniques.",
        strategies: &[
            StrategyDef {
                id: "impute_mean",
                description: "Use when missing values are numeric and approximately normally \
                    distributed.",
                prompt: prompt!("impute_mean"),
            },
            StrategyDef {
                id: "impute_median",
                description: "Use when missing values are numeric and the feature contains \
                    outliers.",
                prompt: prompt!("impute_median"),
            },
            StrategyDef {
                id: "impute_mode",
                description: "Use when the feature is categorical or has few unique values.",
                prompt: prompt!("impute_mode"),
            },
            StrategyDef {
                id: "fill_constant",
                description: "Use when a specific placeholder or domain-specific value is \
                    needed.",
                prompt: prompt!("fill_constant"),
            },
        ],
    },
    StageDef {
        id: "outliers_detection",
        description: "Use to detect anomalous values that may skew distributions, affect \
            statistical inference, or harm model performance.",
        strategies: &[
            StrategyDef {
                id: "z_score",
                description: "Use to detect outliers in normally distributed data by measuring \
                    how many standard deviations a point is from the mean.",
                prompt: prompt!("z_score"),
            },
            StrategyDef {
                id: "modified_z_score",
                description: "Use to detect outliers in data with potential skew or \
                    non-normality, using median and MAD.",
                prompt: prompt!("modified_z_score"),
            },
            StrategyDef {
                id: "iqr",
                description: "Use to detect outliers based on the interquartile range, \
                    effective for skewed distributions.",
                prompt: prompt!("iqr"),
            },
        ],
    },
    StageDef {
        id: "target_analysis",
        description: "Use to assess the target variable for issues such as class imbalance or \
            outlier targets, which affect modeling.",
        strategies: &[
            StrategyDef {
                id: "class_imbalance",
                description: "Use to assess if the target variable has uneven class \
                    distributions that may impact model performance.",
                prompt: prompt!("class_imbalance"),
            },
            StrategyDef {
                id: "target_outliers",
                description: "Use to detect abnormal or extreme target values that could bias \
                    model training.",
                prompt: prompt!("target_outliers"),
            },
        ],
    },
    StageDef {
        id: "type_handling",
        description: "Use to convert or infer data types, ensuring compatibility with ML models.",
        strategies: &[
            StrategyDef {
                id: "parse_datetime",
                description: "Use to convert columns containing date or time information into \
                    datetime objects for easier analysis.",
                prompt: prompt!("parse_datetime"),
            },
            StrategyDef {
                id: "convert_object_to_numeric",
                description: "Use to convert object-type columns containing numeric values \
                    into proper numeric dtype.",
                prompt: prompt!("convert_object_to_numeric"),
            },
        ],
    },
    StageDef {
        id: "data_ingestion",
        description: "Use to load and parse data from supported sources.",
        strategies: &[StrategyDef {
            id: "csv",
            description: "Use for ingesting datasets in CSV format, commonly used for tabular \
                data.",
            prompt: prompt!("csv"),
        }],
    },
];

/// The `EDA` pipeline with all six stages.
pub fn pipeline() -> Result<Pipeline> {
    build_pipeline(PIPELINE_ID, DESCRIPTION, STAGES)
}
