macro_rules! define_strings {
    (
        $($name:ident = $value:literal);*$(;)?
    ) => {
        $(
            pub const $name: &str = $value;
        )*
    };
}

pub mod sjs {
    define_strings! {
        GTF =
            "Query annotation in GTF format. Transcripts are grouped by the \
            transcript_id attribute of their exon rows.";
        DB =
            "Query annotation store (SQLite). Mutually exclusive with --gtf.";
        BUILD =
            "Genome build to read from the annotation store. All builds are \
            read if not set.";
        REFERENCE =
            "Reference annotation in GTF format. Query edges are classified \
            against the edges of this annotation.";
        MODE =
            "Edge kind to report: exon or intron. May be given twice to \
            write both tables in one run.";
        OUTPREFIX =
            "Output prefix. Tables are written to <prefix>_introns.tsv and \
            <prefix>_exons.tsv.";
    }
}

pub mod partition {
    define_strings! {
        SAM =
            "Alignment files in SAM format. Records of all files are pooled \
            before merging.";
        DATASETS =
            "Dataset label of every alignment file, in the same order as \
            --sam. Defaults to the file names.";
        OUTPUT =
            "Output BED file with one window per line.";
        STRICT =
            "Abort on the first malformed alignment record instead of \
            skipping it.";
        MAX_SKIPPED =
            "Abort once more than this many malformed records were skipped.";
    }
}
