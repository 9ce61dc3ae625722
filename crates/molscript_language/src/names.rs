//! The static name table.
//!
//! Each entry is a surface name and either a token code or `None`. A `None`
//! entry is an alias of the nearest preceding named entry and shares its
//! descriptor, including its canonical spelling.

use crate::token::Tok;

macro_rules! name_table {
    ($($name:literal $(=> $tok:ident)?),* $(,)?) => {
        &[$(($name, name_table!(@tok $($tok)?))),*]
    };
    (@tok $tok:ident) => { Some(Tok::$tok) };
    (@tok) => { None };
}

/// Surface names in registration order.
pub(crate) static NAMES: &[(&str, Option<Tok>)] = name_table![
    // operators
    "(" => LEFTPAREN,
    ")" => RIGHTPAREN,
    "and" => OP_AND,
    "&",
    "&&",
    "or" => OP_OR,
    "|",
    "||",
    "?" => OP_IF,
    "," => COMMA,
    "+=" => ANDEQUALS,
    "-=",
    "*=",
    "/=",
    "\\=",
    "&=",
    "|=",
    "not" => OP_NOT,
    "!",
    "xor" => OP_XOR,
    "tog" => OP_TOGGLE,
    "<" => OP_LT,
    "<=" => OP_LE,
    ">=" => OP_GE,
    ">" => OP_GT,
    "=" => OP_EQ,
    "==",
    "!=" => OP_NE,
    "<>",
    "within" => WITHIN,
    "." => PER,
    "[" => LEFTSQUARE,
    "]" => RIGHTSQUARE,
    "{" => LEFTBRACE,
    "}" => RIGHTBRACE,
    "$" => DOLLARSIGN,
    "%" => PERCENT,
    ":" => COLON,
    ";" => SEMICOLON,
    "++" => PLUS_PLUS,
    "--" => MINUS_MINUS,
    "**" => TIMES_TIMES,
    "+" => PLUS,
    "-" => MINUS,
    "*" => TIMES,
    "/" => DIVIDE,
    "\\" => LEFTDIVIDE,
    // flow commands
    "elseif" => ELSEIF,
    "else" => ELSE,
    "endif" => ENDIF,
    "for" => FOR,
    "if" => IF,
    "while" => WHILE,
    "break" => BREAK,
    "continue" => CONTINUE,
    "end" => END,
    "switch" => SWITCH,
    "case" => CASE,
    "catch" => CATCH,
    "default" => DEFAULT,
    "try" => TRY,
    "function" => FUNCTION,
    "functions",
    "parallel" => PARALLEL,
    "process" => PROCESS,
    // atom-expression commands
    "center" => CENTER,
    "centre",
    "define" => DEFINE,
    "@",
    "delete" => DELETE,
    "display" => DISPLAY,
    "fixed" => FIXED,
    "hide" => HIDE,
    "restrict" => RESTRICT,
    "subset" => SUBSET,
    "zap" => ZAP,
    "select" => SELECT,
    // math-expression commands
    "print" => PRINT,
    "return" => RETURN,
    "set" => SET,
    "var" => VAR,
    "log" => LOG,
    "prompt" => PROMPT,
    // implicit-string commands
    "echo" => ECHO,
    "help" => HELP,
    "hover" => HOVER,
    "message" => MESSAGE,
    "pause" => PAUSE,
    "wait",
    "goto" => GOTO,
    "cd" => CD,
    "javascript" => JAVASCRIPT,
    // script commands
    "animation" => ANIMATION,
    "anim",
    "assign" => ASSIGN,
    "background" => BACKGROUND,
    "bind" => BIND,
    "bondorder" => BONDORDER,
    "calculate" => CALCULATE,
    "capture" => CAPTURE,
    "centerAt" => CENTER_AT,
    "color" => COLOR,
    "colour",
    "compare" => COMPARE,
    "configuration" => CONFIGURATION,
    "conformation",
    "config",
    "connect" => CONNECT,
    "console" => CONSOLE,
    "data" => DATA,
    "delay" => DELAY,
    "depth" => DEPTH,
    "exit" => EXIT,
    "exitjmol" => EXITJMOL,
    "file" => FILE,
    "files",
    "font" => FONT,
    "frame" => FRAME,
    "frames",
    "getproperty" => GETPROPERTY,
    "hbond" => HBOND,
    "hbonds",
    "history" => HISTORY,
    "initialize" => INITIALIZE,
    "invertSelected" => INVERT_SELECTED,
    "load" => LOAD,
    "loop" => LOOP,
    "mapProperty" => MAP_PROPERTY,
    "minimize" => MINIMIZE,
    "minimization",
    "model" => MODEL,
    "models",
    "move" => MOVE,
    "moveto" => MOVETO,
    "navigate" => NAVIGATE,
    "navigation",
    "plot" => PLOT,
    "pop" => POP,
    "push" => PUSH,
    "quaternion" => QUATERNION,
    "quaternions",
    "quit" => QUIT,
    "ramachandran" => RAMACHANDRAN,
    "rama",
    "redo" => REDOMOVE,
    "refresh" => REFRESH,
    "reset" => RESET,
    "unset",
    "restore" => RESTORE,
    "resume" => RESUME,
    "rotate" => ROTATE,
    "rotateSelected" => ROTATE_SELECTED,
    "save" => SAVE,
    "script" => SCRIPT,
    "source",
    "selectionHalos" => SELECTIONHALOS,
    "selectionHalo",
    "showSelections",
    "show" => SHOW,
    "slab" => SLAB,
    "spin" => SPIN,
    "ssbond" => SSBOND,
    "ssbonds",
    "step" => STEP,
    "steps",
    "stereo" => STEREO,
    "structure" => STRUCTURE,
    "_structure",
    "sync" => SYNC,
    "synchronize",
    "timeout" => TIMEOUT,
    "translate" => TRANSLATE,
    "translateSelected" => TRANSLATE_SELECTED,
    "unbind" => UNBIND,
    "undo" => UNDOMOVE,
    "vibration" => VIBRATION,
    "write" => WRITE,
    "zoom" => ZOOM,
    "zoomTo" => ZOOM_TO,
    // shape commands
    "axes" => AXES,
    "backbone" => BACKBONE,
    "boundbox" => BOUNDBOX,
    "boundingBox",
    "cartoon" => CARTOON,
    "cartoons",
    "cgo" => CGO,
    "contact" => CONTACT,
    "contacts",
    "dipole" => DIPOLE,
    "dipoles",
    "dots" => DOTS,
    "draw" => DRAW,
    "ellipsoid" => ELLIPSOID,
    "ellipsoids",
    "frank" => FRANK,
    "geosurface" => GEOSURFACE,
    "halo" => HALO,
    "halos",
    "isosurface" => ISOSURFACE,
    "label" => LABEL,
    "labels",
    "lcaoCartoon" => LCAOCARTOON,
    "lcaoCartoons",
    "measure" => MEASURE,
    "measures",
    "monitor",
    "monitors",
    "measurements" => MEASUREMENTS,
    "meshRibbon" => MESHRIBBON,
    "meshRibbons",
    "mo" => MO,
    "pmesh" => PMESH,
    "plot3d" => PLOT3D,
    "polyhedra" => POLYHEDRA,
    "ribbon" => RIBBON,
    "ribbons",
    "rocket" => ROCKET,
    "rockets",
    "spacefill" => SPACEFILL,
    "cpk",
    "star" => STAR,
    "stars",
    "strands" => STRANDS,
    "strand",
    "struts" => STRUTS,
    "strut",
    "trace" => TRACE,
    "unitcell" => UNITCELL,
    "vector" => VECTOR,
    "vectors",
    "wireframe" => WIREFRAME,
    // expression terms
    "expressionBegin" => EXPRESSION_BEGIN,
    "expressionEnd" => EXPRESSION_END,
    "branch" => BRANCH,
    "coord" => COORD,
    "isaromatic" => ISAROMATIC,
    // predefined sets
    "amino" => AMINO,
    "dna" => DNA,
    "hetero" => HETERO,
    "helixalpha" => HELIXALPHA,
    "helix310" => HELIX310,
    "helixpi" => HELIXPI,
    "hydrogen" => HYDROGEN,
    "nucleic" => NUCLEIC,
    "protein" => PROTEIN,
    "purine" => PURINE,
    "pyrimidine" => PYRIMIDINE,
    "rna" => RNA,
    "solvent" => SOLVENT,
    "sidechain" => SIDECHAIN,
    "surface" => SURFACE,
    "thismodel" => THISMODEL,
    "sheet" => SHEET,
    "spine" => SPINE,
    "carbohydrate" => CARBOHYDRATE,
    "clickable" => CLICKABLE,
    "displayed" => DISPLAYED,
    "hidden" => HIDDEN,
    "specialposition" => SPECIALPOSITION,
    "visible" => VISIBLE,
    "basemodel" => BASEMODEL,
    "nonequivalent" => NONEQUIVALENT,
    "helix" => HELIX,
    "aromatic" => AROMATIC,
    // value properties
    "atoms" => ATOMS,
    "atom",
    "bonds" => BONDS,
    "bond",
    "length" => LENGTH,
    "lines" => LINES,
    "reverse" => REVERSE,
    "size" => SIZE,
    "type" => TYPE,
    "xyz" => XYZ,
    "fxyz" => FRACXYZ,
    "w" => W,
    "keys" => KEYS,
    // atom properties
    "occupancy" => OCCUPANCY,
    "radius" => RADIUS,
    "atomType" => ATOMTYPE,
    "atomName" => ATOMNAME,
    "altloc" => ALTLOC,
    "altlocs",
    "chain" => CHAIN,
    "chains",
    "element" => ELEMENT,
    "elements",
    "group" => GROUP,
    "groups",
    "group1" => GROUP1,
    "sequence" => SEQUENCE,
    "identify" => IDENTIFY,
    "insertion" => INSERTION,
    "insertions",
    "shape" => SHAPE,
    "strucid" => STRUCID,
    "symbol" => SYMBOL,
    "symmetry" => SYMMETRY,
    "atomno" => ATOMNO,
    "atomID" => ATOMID,
    "atomIndex" => ATOMINDEX,
    "bondcount" => BONDCOUNT,
    "cell" => CELL,
    "chainNo" => CHAINNO,
    "elemno" => ELEMNO,
    "formalCharge" => FORMALCHARGE,
    "charge",
    "groupID" => GROUPID,
    "groupIndex" => GROUPINDEX,
    "modelIndex" => MODELINDEX,
    "molecule" => MOLECULE,
    "molecules",
    "polymer" => POLYMER,
    "polymers",
    "resno" => RESNO,
    "site" => SITE,
    "strucno" => STRUCNO,
    "valence" => VALENCE,
    "mass" => MASS,
    "phi" => PHI,
    "psi" => PSI,
    "partialCharge" => PARTIALCHARGE,
    "temperature" => TEMPERATURE,
    "x" => X,
    "y" => Y,
    "z" => Z,
    "vanderwaals" => VANDERWAALS,
    "vdw",
    "property" => PROPERTY,
    "hydrophobicity" => HYDROPHOBIC,
    "hydrophobic",
    "selected" => SELECTED,
    // math functions
    "angle" => ANGLE,
    "array" => ARRAY,
    "axisangle" => AXISANGLE,
    "connected" => CONNECTED,
    "format" => FORMAT,
    "now" => NOW,
    "plane" => PLANE,
    "point" => POINT,
    "sort" => SORT,
    "count" => COUNT,
    "tensor" => TENSOR,
    "modulation" => MODULATION,
    "cache" => CACHE,
    "acos" => ACOS,
    "sin" => SIN,
    "cos" => COS,
    "sqrt" => SQRT,
    "abs" => ABS,
    "div" => DIV,
    "dot" => DOT,
    "join" => JOIN,
    "mul" => MUL,
    "mul3" => MUL3,
    "split" => SPLIT,
    "sub" => SUB,
    "trim" => TRIM,
    "volume" => VOLUME,
    "col" => COL,
    "row" => ROW,
    "cross" => CROSS,
    "random" => RANDOM,
    "substructure" => SUBSTRUCTURE,
    "search" => SEARCH,
    "smiles" => SMILES,
    "add" => ADD,
    "distance" => DISTANCE,
    "replace" => REPLACE,
    "hkl" => HKL,
    "intersection" => INTERSECTION,
    "bin" => BIN,
    "symop" => SYMOP,
    "find" => FIND,
    // aggregates
    "min" => MIN,
    "max" => MAX,
    "average" => AVERAGE,
    "sum" => SUM,
    "sum2" => SUM2,
    "stddev" => STDDEV,
    // set parameters
    "backgroundModel" => BACKGROUNDMODEL,
    "debug" => DEBUG,
    "defaultLattice" => DEFAULTLATTICE,
    "highlight" => HIGHLIGHT,
    "showScript" => SHOWSCRIPT,
    "specular" => SPECULAR,
    "trajectory" => TRAJECTORY,
    "trajectories",
    "undoAuto" => UNDO,
    "bondMode" => BONDMODE,
    "fontSize" => FONTSIZE,
    "animationMode" => ANIMATIONMODE,
    "backgroundColor" => BACKGROUNDCOLOR,
    "defaultColorScheme" => DEFAULTCOLORSCHEME,
    "defaultDirectory" => DEFAULTDIRECTORY,
    "forceField" => FORCEFIELD,
    "hoverLabel" => HOVERLABEL,
    "language" => LANGUAGE,
    "loadFormat" => LOADFORMAT,
    "logFile" => LOGFILE,
    "measurementUnits" => MEASUREMENTUNITS,
    "picking" => PICKING,
    "pickingStyle" => PICKINGSTYLE,
    "axesScale" => AXESSCALE,
    "bondTolerance" => BONDTOLERANCE,
    "cameraDepth" => CAMERADEPTH,
    "hoverDelay" => HOVERDELAY,
    "minBondDistance" => MINBONDDISTANCE,
    "rotationRadius" => ROTATIONRADIUS,
    "spinFps" => SPINFPS,
    "spinX" => SPINX,
    "spinY" => SPINY,
    "spinZ" => SPINZ,
    "stereoDegrees" => STEREODEGREES,
    "vibrationPeriod" => VIBRATIONPERIOD,
    "vibrationScale" => VIBRATIONSCALE,
    "ambientPercent" => AMBIENTPERCENT,
    "ambient",
    "animationFps" => ANIMATIONFPS,
    "axesMode" => AXESMODE,
    "diffusePercent" => DIFFUSEPERCENT,
    "diffuse",
    "dotDensity" => DOTDENSITY,
    "hermiteLevel" => HERMITELEVEL,
    "historyLevel" => HISTORYLEVEL,
    "logLevel" => LOGLEVEL,
    "percentVdwAtom" => PERCENTVDWATOM,
    "scriptReportingLevel" => SCRIPTREPORTINGLEVEL,
    "specularPercent" => SPECULARPERCENT,
    "specularPower" => SPECULARPOWER,
    "strandCount" => STRANDCOUNT,
    "allowEmbeddedScripts" => ALLOWEMBEDDEDSCRIPTS,
    "antialiasDisplay" => ANTIALIASDISPLAY,
    "appendNew" => APPENDNEW,
    "autoBond" => AUTOBOND,
    "axesMolecular" => AXESMOLECULAR,
    "cartoonRockets" => CARTOONROCKETS,
    "chainCaseSensitive" => CHAINCASESENSITIVE,
    "debugScript" => DEBUGSCRIPT,
    "hbondsBackbone" => HBONDSBACKBONE,
    "hbondsSolid" => HBONDSSOLID,
    "logCommands" => LOGCOMMANDS,
    "measurementLabels" => MEASUREMENTLABELS,
    "measurementNumbers",
    "messageStyleChime" => MESSAGESTYLECHIME,
    "perspectiveDepth" => PERSPECTIVEDEPTH,
    "refreshing" => REFRESHING,
    "scriptQueue" => SCRIPTQUEUE,
    "selectAllModels" => SELECTALLMODELS,
    "showAxes" => SHOWAXES,
    "showBoundBox" => SHOWBOUNDBOX,
    "showHydrogens" => SHOWHYDROGENS,
    "showMeasurements" => SHOWMEASUREMENTS,
    "showTiming" => SHOWTIMING,
    "showUnitcell" => SHOWUNITCELL,
    "slabEnabled" => SLABENABLED,
    "solventProbe" => SOLVENTPROBE,
    "ssbondsBackbone" => SSBONDSBACKBONE,
    "statusReporting" => STATUSREPORTING,
    "translucent" => TRANSLUCENT,
    "windowCentered" => WINDOWCENTERED,
    "zoomEnabled" => ZOOMENABLED,
    "zShade" => ZSHADE,
    // miscellaneous
    "absolute" => ABSOLUTE,
    "addHydrogens" => ADDHYDROGENS,
    "align" => ALIGN,
    "angstroms" => ANGSTROMS,
    "angstrom",
    "append" => APPEND,
    "arc" => ARC,
    "arrow" => ARROW,
    "as" => AS,
    "auto" => AUTO,
    "axis" => AXIS,
    "balls" => BALLS,
    "basepair" => BASEPAIR,
    "basepairs",
    "best" => BEST,
    "bottom" => BOTTOM,
    "cancel" => CANCEL,
    "check" => CHECK,
    "circle" => CIRCLE,
    "clear" => CLEAR,
    "clipboard" => CLIPBOARD,
    "command" => COMMAND,
    "commands" => COMMANDS,
    "contour" => CONTOUR,
    "contours",
    "create" => CREATE,
    "cutoff" => CUTOFF,
    "cylinder" => CYLINDER,
    "density" => DENSITY,
    "diameter" => DIAMETER,
    "direction" => DIRECTION,
    "dotted" => DOTTED,
    "energy" => ENERGY,
    "error" => ERROR,
    "fill" => FILL,
    "filter" => FILTER,
    "first" => FIRST,
    "fps" => FPS,
    "from" => FROM,
    "front" => FRONT,
    "full" => FULL,
    "id" => ID,
    "image" => IMAGE,
    "in" => IN,
    "increment" => INCREMENT,
    "info" => INFO,
    "inline" => INLINE,
    "jmol" => JMOL,
    "last" => LAST,
    "left" => LEFT,
    "line" => LINE,
    "list" => LIST,
    "menu" => MENU,
    "mesh" => MESH,
    "mode" => MODE,
    "name" => NAME,
    "next" => NEXT,
    "noFill" => NOFILL,
    "noMesh" => NOMESH,
    "normal" => NORMAL,
    "object" => OBJECT,
    "offset" => OFFSET,
    "once" => ONCE,
    "only" => ONLY,
    "opaque" => OPAQUE,
    "orientation" => ORIENTATION,
    "orientations",
    "origin" => ORIGIN,
    "out" => OUT,
    "path" => PATH,
    "pdb" => PDB,
    "pdbheader" => PDBHEADER,
    "play" => PLAY,
    "polygon" => POLYGON,
    "polygons",
    "prev" => PREV,
    "range" => RANGE,
    "rasmol" => RASMOL,
    "remove" => REMOVE,
    "residue" => RESIDUE,
    "residues",
    "resolution" => RESOLUTION,
    "rewind" => REWIND,
    "right" => RIGHT,
    "rotation" => ROTATION,
    "scale" => SCALE,
    "selection" => SELECTION,
    "silent" => SILENT,
    "solid" => SOLID,
    "spacegroup" => SPACEGROUP,
    "sphere" => SPHERE,
    "state" => STATE,
    "stop" => STOP,
    "title" => TITLE,
    "titles",
    "to" => TO,
    "top" => TOP,
    "transform" => TRANSFORM,
    "translation" => TRANSLATION,
    "url" => URL,
    "user" => USER,
    "val" => VALUE,
    "variable" => VARIABLE,
    "variables" => VARIABLES,
    "width" => WIDTH,
];

/// Entries whose descriptor differs from the plain `name => TOK` form.
///
/// `on`/`true` carry auxiliary value 1, `off`/`false` carry 0, and the
/// remaining entries share one descriptor under a different canonical name.
pub(crate) static SPECIAL: &[(&str, Tok, i32, &str)] = &[
    ("all", Tok::ALL, 0, "all"),
    ("off", Tok::OFF, 0, "off"),
    ("false", Tok::OFF, 0, "off"),
    ("on", Tok::ON, 1, "on"),
    ("true", Tok::ON, 1, "on"),
    ("none", Tok::NONE, 0, "none"),
    ("null", Tok::NONE, 0, "none"),
    ("inherit", Tok::NONE, 0, "none"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_entry_is_named() {
        assert!(NAMES[0].1.is_some());
    }

    #[test]
    fn names_are_nonempty() {
        assert!(NAMES.iter().all(|(name, _)| !name.is_empty()));
        assert!(SPECIAL.iter().all(|(name, ..)| !name.is_empty()));
    }
}
