//! Table layout of the annotation store.

/// Counter category names as stored in the `counters` table.
pub(crate) const VERTEX_COUNTER: &str = "vertex";
pub(crate) const EDGE_COUNTER: &str = "edge";
pub(crate) const TRANSCRIPT_COUNTER: &str = "transcripts";

pub(crate) const TRANSCRIPT_ID_ATTR: &str = "transcript_id";
pub(crate) const GENE_ID_ATTR: &str = "gene_id";

pub(crate) const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS location (
    genome_build TEXT NOT NULL,
    location_ID  INTEGER NOT NULL,
    chromosome   TEXT NOT NULL,
    position     INTEGER NOT NULL,
    PRIMARY KEY (location_ID, genome_build)
);

CREATE TABLE IF NOT EXISTS edge (
    edge_ID   INTEGER PRIMARY KEY,
    v1        INTEGER NOT NULL,
    v2        INTEGER NOT NULL,
    edge_type TEXT NOT NULL,
    strand    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS transcripts (
    transcript_ID INTEGER PRIMARY KEY,
    gene_ID       INTEGER,
    start_exon    INTEGER NOT NULL,
    jn_path       TEXT,
    end_exon      INTEGER NOT NULL,
    start_vertex  INTEGER NOT NULL,
    end_vertex    INTEGER NOT NULL,
    n_exons       INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS transcript_annotations (
    ID         INTEGER NOT NULL,
    annot_name TEXT NOT NULL,
    source     TEXT,
    attribute  TEXT NOT NULL,
    value      TEXT,
    PRIMARY KEY (ID, annot_name, attribute)
);

CREATE TABLE IF NOT EXISTS counters (
    category TEXT PRIMARY KEY,
    count    INTEGER NOT NULL
);

INSERT OR IGNORE INTO counters (category, count) VALUES
    ('vertex', 0),
    ('edge', 0),
    ('transcripts', 0);
";
