macro_rules! define_strings {
    (
        $($name:ident = $value:literal);*$(;)?
    ) => {
        $(
            pub const $name: &str = $value;
        )*
    };
}

pub mod menu {
    define_strings! {
        GFF2GTF =
            "Convert GFF3 to GTF, resolving gene and transcript links.";
        GTF2GTF =
            "Re-normalize a GTF file (version header, identifier attributes).";
        GTF2GFF =
            "Convert GTF to GFF3 with explicit ID/Parent attributes.";
        GTF2BED =
            "Convert GTF or GFF3 to BED12, one row per transcript.";
        SPLICESITES =
            "Extract splice junctions from a splice aligner's alignment report.";
    }
}

pub mod io {
    define_strings! {
        INPUT =
            "Path to the input file. Compressed input (.gz, .zst, .bz2, .xz) \
            is detected by extension.";
        OUTPUT =
            "Path for the generated output file. Missing directories are \
            created.";
    }
}

pub mod convert {
    define_strings! {
        FEATURES =
            "Feature types written to the GTF output. Other records are \
            dropped.";
        NO_HEADER =
            "Do not write the format version header.";
    }
}

pub mod splicesites {
    define_strings! {
        INPUT =
            "Path to the alignment report.";
        OUTPUT =
            "Path for the alignment summary (chrom, start, end, strand, \
            junctions).";
        JUNCTIONS =
            "Path for the junction count table. Defaults to the summary path \
            with a `.junctions` suffix.";
    }
}

pub mod utils {
    define_strings! {
        VERBOSE =
            "Increase logging verbosity (-v info, -vv debug). RUST_LOG takes \
            precedence.";
        NO_PROGRESS =
            "Do not show the progress bar.";
    }
}
